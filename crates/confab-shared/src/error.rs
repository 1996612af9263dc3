use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("User id must not be empty")]
    EmptyUserId,

    #[error("Cannot open a conversation with yourself")]
    SelfConversation,
}
