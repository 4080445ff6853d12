use quillpost::models::{BlogPost, Role, User};

#[test]
fn test_role_serializes_as_lowercase_text() {
    // The role travels as lowercase text both in the database column and in
    // any serialized form.
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    assert_eq!(serde_json::to_string(&Role::Member).unwrap(), r#""member""#);

    let parsed: Role = serde_json::from_str(r#""admin""#).unwrap();
    assert_eq!(parsed, Role::Admin);
}

#[test]
fn test_user_serialization_never_leaks_password_hash() {
    let user = User {
        id: 1,
        name: "Alice".to_string(),
        email: "a@x.com".to_string(),
        password_hash: "$pbkdf2-sha256$secret".to_string(),
        role: Role::Member,
    };

    let json_output = serde_json::to_string(&user).unwrap();
    assert!(!json_output.contains("password_hash"));
    assert!(!json_output.contains("secret"));
    assert!(json_output.contains(r#""email":"a@x.com""#));
}

#[test]
fn test_default_role_is_member() {
    assert_eq!(Role::default(), Role::Member);
    assert!(!User::default().is_admin());
}

#[test]
fn test_blog_post_carries_joined_author_name() {
    // The author's display name rides along with the row; the date is plain
    // preformatted text, not a timestamp.
    let post = BlogPost {
        id: 1,
        title: "Hello".to_string(),
        subtitle: "A subtitle".to_string(),
        date: "January 02, 2026".to_string(),
        body: "Body text".to_string(),
        img_url: "https://example.com/cover.jpg".to_string(),
        author_id: 1,
        author_name: "Boss".to_string(),
    };

    let json_output = serde_json::to_string(&post).unwrap();
    assert!(json_output.contains(r#""author_name":"Boss""#));
    assert!(json_output.contains(r#""date":"January 02, 2026""#));
}
