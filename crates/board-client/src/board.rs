use board_types::api::CreateCommentRequest;
use board_types::models::Comment;
use tracing::{debug, error, warn};

use crate::api::ApiClient;
use crate::dom::Node;
use crate::error::ClientError;
use crate::render::{self, EncodingPolicy, PageView};
use crate::validate::validate_input;

pub const LOAD_FAILED: &str = "Failed to load comments. Please try again later.";

/// Page controller for one viewer session.
///
/// Holds only what is on screen: rendered comments in display order, the
/// user table if it was requested, and a status line. Nothing survives
/// the session.
pub struct Board {
    api: ApiClient,
    policy: EncodingPolicy,
    comments: Vec<(i64, Node)>,
    users: Option<Node>,
    status: Option<String>,
}

impl Board {
    pub fn new(api: ApiClient, policy: EncodingPolicy) -> Self {
        Self {
            api,
            policy,
            comments: Vec::new(),
            users: None,
            status: None,
        }
    }

    pub fn policy(&self) -> EncodingPolicy {
        self.policy
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Ids of displayed comments, in display order.
    pub fn comment_ids(&self) -> Vec<i64> {
        self.comments.iter().map(|(id, _)| *id).collect()
    }

    pub fn users_shown(&self) -> bool {
        self.users.is_some()
    }

    /// Replace the displayed comments with the server's list.
    pub async fn load(&mut self) -> Result<usize, ClientError> {
        let comments = match self.api.list_comments().await {
            Ok(comments) => comments,
            Err(e) => {
                error!("Error fetching comments: {}", e);
                self.status = Some(LOAD_FAILED.to_string());
                return Err(e);
            }
        };

        debug!("Comments retrieved: {}", comments.len());
        self.status = None;
        self.comments = comments
            .iter()
            .map(|c| (c.id, render::render_comment(c, self.policy)))
            .collect();
        Ok(self.comments.len())
    }

    /// Post a comment and append it to the display.
    ///
    /// Under [`EncodingPolicy::Escaped`] obviously script-bearing input is
    /// refused before any request is made. Under [`EncodingPolicy::Raw`]
    /// the user table is refreshed afterwards.
    pub async fn submit(&mut self, author: &str, body: &str) -> Result<Comment, ClientError> {
        if self.policy == EncodingPolicy::Escaped {
            for input in [author, body] {
                if !validate_input(input) {
                    warn!("Rejected script-bearing input");
                    return Err(ClientError::Rejected(input.to_string()));
                }
            }
        }

        let comment = self
            .api
            .create_comment(&CreateCommentRequest::new(author, body))
            .await?;
        self.comments
            .push((comment.id, render::render_comment(&comment, self.policy)));

        if self.policy == EncodingPolicy::Raw {
            if let Err(e) = self.show_users().await {
                error!("Failed to fetch users: {}", e);
            }
        }

        Ok(comment)
    }

    /// Delete on the server, then drop the comment from the display even
    /// if the delete failed.
    pub async fn remove(&mut self, id: i64) {
        match self.api.delete_comment(id).await {
            Ok(()) => debug!("Comment {} deleted from server", id),
            Err(e) => error!("Error deleting comment {}: {}", id, e),
        }
        self.comments.retain(|(cid, _)| *cid != id);
    }

    /// Fetch and render the user table.
    pub async fn show_users(&mut self) -> Result<(), ClientError> {
        let users = self.api.list_users().await?;
        self.users = Some(render::render_users(&users, self.policy));
        Ok(())
    }

    pub fn comments_html(&self) -> String {
        self.comments.iter().map(|(_, node)| node.to_html()).collect()
    }

    pub fn users_html(&self) -> Option<String> {
        self.users.as_ref().map(Node::to_html)
    }

    pub fn to_html(&self) -> String {
        let comments: Vec<Node> = self.comments.iter().map(|(_, n)| n.clone()).collect();
        render::render_page(&PageView {
            comments: &comments,
            users: self.users.as_ref(),
            status: self.status.as_deref(),
            policy: self.policy,
        })
    }
}
