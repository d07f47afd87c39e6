//! Admin section layout.
//!
//! Wraps page content with the shared console chrome: one sidebar
//! navigation element followed by one content region holding exactly the
//! supplied content. The stylesheet is served from the asset registry, not
//! baked into the markup.

use maud::{html, Markup, DOCTYPE};

/// Stylesheet location within the registered asset region.
pub const STYLESHEET_HREF: &str = "/_assets/admin.css";

/// Wrap page content in the admin layout.
pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · polyroute admin" }
                link rel="stylesheet" href=(STYLESHEET_HREF);
            }
            body {
                nav class="sidebar" {
                    p class="brand" { "polyroute" }
                    ul {
                        li { a href="/admin" { "Overview" } }
                        li { a href="/admin/locales" { "Locales" } }
                        li { a href="/admin/routing" { "Routing" } }
                    }
                }
                main class="content" {
                    (content)
                }
            }
        }
    }
}
