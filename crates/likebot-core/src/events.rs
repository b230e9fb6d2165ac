use crate::domain::MessageRef;

/// A recognized notification from the chat platform.
///
/// Adapters map raw platform updates into this enum before handing them to
/// the dispatcher; anything that fits neither variant is dropped at the
/// intake and never reaches the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// Someone pressed the like button attached to the referenced message.
    CallbackAction(MessageRef),
    /// A new channel post was published; no counter entry exists for it yet.
    NewPost(MessageRef),
}
