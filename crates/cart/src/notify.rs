//! User-facing notices for cart operations.
//!
//! The store's mutators are fire-and-forget: failures never reach the
//! caller as errors. Instead each failed operation emits exactly one
//! typed [`Notice`] through an injected [`Notifier`], and the consuming
//! layer (toast UI, CLI, logs) chooses how to present it.

/// Feedback kind surfaced to the user after a failed cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Requested quantity exceeds the available stock.
    OutOfStock,
    /// Adding a product failed for an unexpected reason.
    AddFailed,
    /// The product to remove is not in the cart, or removal failed.
    RemoveFailed,
    /// Changing a product's quantity failed for an unexpected reason.
    UpdateFailed,
}

impl Notice {
    /// Canonical user-facing copy for this notice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::AddFailed => "Failed to add product",
            Self::RemoveFailed => "Failed to remove product",
            Self::UpdateFailed => "Failed to change product quantity",
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier: Send + Sync {
    /// Deliver one notice to the user.
    fn notify(&self, notice: Notice);
}

/// Notifier that logs notices at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(notice = ?notice, "{}", notice.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_copy() {
        assert_eq!(
            Notice::OutOfStock.message(),
            "Requested quantity is out of stock"
        );
        assert_eq!(Notice::AddFailed.message(), "Failed to add product");
        assert_eq!(Notice::RemoveFailed.message(), "Failed to remove product");
        assert_eq!(
            Notice::UpdateFailed.message(),
            "Failed to change product quantity"
        );
    }
}
