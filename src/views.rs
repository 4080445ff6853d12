use std::sync::Arc;

use crate::{
    auth::CurrentUser,
    models::{BlogPost, Comment},
};

/// Page
///
/// Typed render context for every view the route layer produces. Handlers
/// build one of these and hand it to the engine together with the viewer
/// (for the navigation chrome) and the pending notice, if any.
pub enum Page<'a> {
    Index { posts: &'a [BlogPost] },
    Post { post: &'a BlogPost, comments: &'a [Comment] },
    Register,
    Login,
    ComposePost { existing: Option<&'a BlogPost> },
    About,
    Contact,
}

/// ViewEngine
///
/// Abstract contract for the template-rendering collaborator. The routing
/// layer depends only on this trait, so the built-in renderer below can be
/// swapped for a real template engine without touching a handler.
pub trait ViewEngine: Send + Sync {
    fn render(&self, page: Page<'_>, viewer: &CurrentUser, notice: Option<&str>) -> String;
}

/// ViewState
///
/// The concrete type used to share the view engine across the application
/// state.
pub type ViewState = Arc<dyn ViewEngine>;

/// Escape text for interpolation into HTML content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// HtmlPages
///
/// The built-in renderer: plain, unstyled HTML with the right content and
/// forms. Deliberately minimal, since presentation belongs to the external
/// template collaborator.
pub struct HtmlPages;

impl HtmlPages {
    fn chrome(&self, title: &str, viewer: &CurrentUser, notice: Option<&str>, body: &str) -> String {
        let mut nav = String::from(r#"<nav><a href="/">Home</a> <a href="/about">About</a> <a href="/contact">Contact</a>"#);
        match viewer.user() {
            Some(user) => {
                if user.is_admin() {
                    nav.push_str(r#" <a href="/new-post">New Post</a>"#);
                }
                nav.push_str(r#" <a href="/logout">Log Out</a>"#);
            }
            None => {
                nav.push_str(r#" <a href="/login">Login</a> <a href="/register">Register</a>"#);
            }
        }
        nav.push_str("</nav>");

        let banner = match notice {
            Some(text) => format!(r#"<p class="notice">{}</p>"#, escape(text)),
            None => String::new(),
        };

        format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n\
             <body>{}{}{}</body></html>",
            escape(title),
            nav,
            banner,
            body
        )
    }

    fn post_card(&self, post: &BlogPost) -> String {
        format!(
            r#"<article><h2><a href="/post/{id}">{title}</a></h2><h3>{subtitle}</h3><p>Posted by {author} on {date}</p></article>"#,
            id = post.id,
            title = escape(&post.title),
            subtitle = escape(&post.subtitle),
            author = escape(&post.author_name),
            date = escape(&post.date),
        )
    }

    fn compose_form(&self, action: &str, existing: Option<&BlogPost>) -> String {
        let (title, subtitle, img_url, body) = match existing {
            Some(p) => (
                escape(&p.title),
                escape(&p.subtitle),
                escape(&p.img_url),
                escape(&p.body),
            ),
            None => Default::default(),
        };
        format!(
            r#"<form method="post" action="{action}">
<label>Title <input name="title" value="{title}" required></label>
<label>Subtitle <input name="subtitle" value="{subtitle}" required></label>
<label>Image URL <input name="img_url" value="{img_url}" required></label>
<label>Body <textarea name="body" required>{body}</textarea></label>
<button type="submit">Submit Post</button>
</form>"#,
            action = escape(action),
            title = title,
            subtitle = subtitle,
            img_url = img_url,
            body = body,
        )
    }
}

impl ViewEngine for HtmlPages {
    fn render(&self, page: Page<'_>, viewer: &CurrentUser, notice: Option<&str>) -> String {
        match page {
            Page::Index { posts } => {
                let cards: String = posts.iter().map(|p| self.post_card(p)).collect();
                self.chrome("All Posts", viewer, notice, &format!("<h1>Recent Posts</h1>{cards}"))
            }
            Page::Post { post, comments } => {
                let comment_items: String = comments
                    .iter()
                    .map(|c| {
                        format!(
                            "<li><p>{}</p><small>{}</small></li>",
                            escape(&c.text),
                            escape(&c.commenter_name)
                        )
                    })
                    .collect();
                let comment_box = if viewer.user().is_some() {
                    format!(
                        r#"<form method="post" action="/post/{}"><textarea name="text" required></textarea><button type="submit">Submit Comment</button></form>"#,
                        post.id
                    )
                } else {
                    r#"<p><a href="/login">Log in</a> to comment.</p>"#.to_string()
                };
                let body = format!(
                    r#"<article><h1>{title}</h1><h2>{subtitle}</h2><p>Posted by {author} on {date}</p><img src="{img}" alt=""><div>{text}</div></article><section><h3>Comments</h3><ul>{comments}</ul>{form}</section>"#,
                    title = escape(&post.title),
                    subtitle = escape(&post.subtitle),
                    author = escape(&post.author_name),
                    date = escape(&post.date),
                    img = escape(&post.img_url),
                    text = escape(&post.body),
                    comments = comment_items,
                    form = comment_box,
                );
                self.chrome(&post.title, viewer, notice, &body)
            }
            Page::Register => self.chrome(
                "Register",
                viewer,
                notice,
                r#"<h1>Register</h1><form method="post" action="/register">
<label>Name <input name="name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Sign Up</button>
</form>"#,
            ),
            Page::Login => self.chrome(
                "Log In",
                viewer,
                notice,
                r#"<h1>Log In</h1><form method="post" action="/login">
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Let Me In</button>
</form>"#,
            ),
            Page::ComposePost { existing } => {
                let (heading, action) = match existing {
                    Some(post) => ("Edit Post".to_string(), format!("/edit-post/{}", post.id)),
                    None => ("New Post".to_string(), "/new-post".to_string()),
                };
                let body = format!("<h1>{}</h1>{}", heading, self.compose_form(&action, existing));
                self.chrome(&heading, viewer, notice, &body)
            }
            Page::About => self.chrome(
                "About",
                viewer,
                notice,
                "<h1>About Us</h1><p>A small blog run on strong opinions and strong coffee.</p>",
            ),
            Page::Contact => self.chrome(
                "Contact",
                viewer,
                notice,
                "<h1>Contact Us</h1><p>Reach the editors at the usual address.</p>",
            ),
        }
    }
}
