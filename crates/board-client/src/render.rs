use std::fmt;
use std::str::FromStr;

use board_types::models::{Comment, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dom::{Element, Node};

pub const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; script-src 'self'; object-src 'none';";

/// How record text is inserted into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingPolicy {
    /// Fields are concatenated into a markup string and parsed. Anything
    /// that looks like HTML in a comment becomes HTML. This is the
    /// vulnerable path.
    Raw,
    /// Each field is the text content of its own element.
    #[default]
    Escaped,
}

impl EncodingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingPolicy::Raw => "raw",
            EncodingPolicy::Escaped => "escaped",
        }
    }
}

impl fmt::Display for EncodingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "unsafe" => Ok(EncodingPolicy::Raw),
            "escaped" | "safe" => Ok(EncodingPolicy::Escaped),
            other => Err(format!("unknown encoding policy '{}'", other)),
        }
    }
}

/// Id of the empty form every remove button submits through.
pub const REMOVE_FORM_ID: &str = "remove-form";

pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Where the comment form posts for a page rendered with `policy`.
pub fn submit_action(policy: EncodingPolicy) -> String {
    format!("/board?policy={}", policy)
}

/// Where a comment's remove button posts.
pub fn remove_action(id: i64, policy: EncodingPolicy) -> String {
    format!("/board/comments/{}/remove?policy={}", id, policy)
}

/// The page with the user table shown, as "Fetch Users" links to.
pub fn users_link(policy: EncodingPolicy) -> String {
    format!("/board?policy={}&users=true", policy)
}

/// One `div.comment` with author, text, date and a remove button.
pub fn render_comment(comment: &Comment, policy: EncodingPolicy) -> Node {
    let author = if comment.author.is_empty() {
        "Anonymous"
    } else {
        comment.author.as_str()
    };
    let date = format_date(&comment.created_at);
    let remove = remove_action(comment.id, policy);

    let container = Element::new("div")
        .class("comment")
        .attr("data-comment-id", comment.id.to_string());

    match policy {
        EncodingPolicy::Raw => container
            .child(Node::Raw(format!(
                "<div class=\"comment-author\">{}</div>\
                 <div class=\"comment-text\">{}</div>\
                 <div class=\"comment-date\">{}</div>\
                 <button class=\"remove-comment-btn\" type=\"submit\" form=\"{}\" formaction=\"{}\">Remove</button>",
                author, comment.body, date, REMOVE_FORM_ID, remove
            )))
            .into(),
        EncodingPolicy::Escaped => container
            .child(Element::new("div").class("comment-author").text(author))
            .child(Element::new("div").class("comment-text").text(comment.body.as_str()))
            .child(Element::new("div").class("comment-date").text(date))
            .child(
                Element::new("button")
                    .class("remove-comment-btn")
                    .attr("type", "submit")
                    .attr("form", REMOVE_FORM_ID)
                    .attr("formaction", remove)
                    .text("Remove"),
            )
            .into(),
    }
}

/// The user table, password column included.
pub fn render_users(users: &[User], policy: EncodingPolicy) -> Node {
    let container = Element::new("div").class("users");

    match policy {
        EncodingPolicy::Raw => {
            let rows: String = users
                .iter()
                .map(|u| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                        u.id, u.username, u.password, u.email
                    )
                })
                .collect();
            container
                .child(Node::Raw(format!(
                    "<h5>User Database</h5>\
                     <table><thead><tr><th>ID</th><th>Username</th><th>Password</th><th>Email</th></tr></thead>\
                     <tbody>{}</tbody></table>",
                    rows
                )))
                .into()
        }
        EncodingPolicy::Escaped => {
            let header = Element::new("tr").children(
                ["ID", "Username", "Password", "Email"]
                    .into_iter()
                    .map(|h| Node::from(Element::new("th").text(h))),
            );
            let rows = users.iter().map(|u| {
                Node::from(
                    Element::new("tr")
                        .child(Element::new("td").text(u.id.to_string()))
                        .child(Element::new("td").text(u.username.as_str()))
                        .child(Element::new("td").text(u.password.as_str()))
                        .child(Element::new("td").text(u.email.as_str())),
                )
            });
            container
                .child(Element::new("h5").text("User Database"))
                .child(
                    Element::new("table")
                        .child(Element::new("thead").child(header))
                        .child(Element::new("tbody").children(rows)),
                )
                .into()
        }
    }
}

/// Everything needed to draw the full board page.
pub struct PageView<'a> {
    pub comments: &'a [Node],
    pub users: Option<&'a Node>,
    pub status: Option<&'a str>,
    pub policy: EncodingPolicy,
}

/// The whole page as an HTML document. The escaped page also carries a
/// Content-Security-Policy.
pub fn render_page(view: &PageView<'_>) -> String {
    let mut head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(Element::new("title").text("Comment Board"));
    if view.policy == EncodingPolicy::Escaped {
        head = head.child(
            Element::new("meta")
                .attr("http-equiv", "Content-Security-Policy")
                .attr("content", CONTENT_SECURITY_POLICY),
        );
    }

    let form = Element::new("form")
        .id("comment-form")
        .attr("method", "post")
        .attr("action", submit_action(view.policy))
        .child(Element::new("input").id("name").attr("name", "name"))
        .child(Element::new("textarea").id("comment").attr("name", "comment"))
        .child(Element::new("button").attr("type", "submit").text("Post Comment"));

    let mut comments = Element::new("div")
        .id("comments-container")
        .children(view.comments.iter().cloned());
    if let Some(status) = view.status {
        comments = comments.child(Element::new("p").id("loading-comments").text(status));
    }

    let mut users = Element::new("div").id("users-container");
    if let Some(table) = view.users {
        users = users.child(table.clone());
    }

    let body = Element::new("body")
        .attr("data-policy", view.policy.as_str())
        .child(Element::new("h1").text("Comment Board"))
        .child(form)
        .child(comments)
        .child(Element::new("form").id(REMOVE_FORM_ID).attr("method", "post"))
        .child(
            Element::new("a")
                .id("fetch-users-btn")
                .attr("href", users_link(view.policy))
                .text("Fetch Users"),
        )
        .child(users);

    let html = Element::new("html").attr("lang", "en").child(head).child(body);
    format!("<!DOCTYPE html>{}", Node::from(html).to_html())
}
