//! Stateless navigation token encoding, parsing, and validation.
//!
//! Every navigation control carries its full session state inside its custom
//! ID, so each interaction is self-contained and concurrent viewers of the
//! same message cannot race on shared pagination state.

use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) const NAV_TOKEN_PREFIX: &str = "sm";
pub(crate) const JUMP_TOKEN_PREFIX: &str = "smj";

/// Navigation action encoded into a button's custom ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Move one page back.
    Previous,
    /// Open the jump-to-page modal.
    Jump,
    /// Move one page forward.
    Next,
}

impl NavAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Previous => "prev",
            Self::Jump => "jump",
            Self::Next => "next",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "prev" => Some(Self::Previous),
            "jump" => Some(Self::Jump),
            "next" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Parsed navigation token from a button custom ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavToken {
    /// Registry key of the menu this control belongs to.
    pub menu_id: u64,
    /// Which navigation control was pressed.
    pub action: NavAction,
    /// Target page index, zero-based.
    pub target_index: usize,
    /// Page count at render time.
    pub page_count: usize,
    /// User that owns this menu session.
    pub owner_id: u64,
    /// Expiry timestamp (unix seconds).
    pub expires_at: u64,
}

/// Parsed jump-modal token from a modal custom ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpToken {
    /// Registry key of the menu this modal belongs to.
    pub menu_id: u64,
    /// Page count at modal-open time.
    pub page_count: usize,
    /// User that owns this menu session.
    pub owner_id: u64,
    /// Expiry timestamp (unix seconds).
    pub expires_at: u64,
}

/// Validation outcome for navigation interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavValidationError {
    Invalid,
    WrongUser,
    Expired,
    OutOfRange,
}

/// Build a compact custom ID carrying stateless navigation state.
pub(crate) fn build_nav_custom_id(
    menu_id: u64,
    action: NavAction,
    target_index: usize,
    page_count: usize,
    owner_id: u64,
    expires_at: u64,
) -> String {
    format!(
        "{NAV_TOKEN_PREFIX}:{menu_id}:{}:{target_index}:{page_count}:{owner_id}:{expires_at}",
        action.as_str()
    )
}

/// Parse a navigation custom ID.
pub(crate) fn parse_nav_custom_id(custom_id: &str) -> Option<NavToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != NAV_TOKEN_PREFIX {
        return None;
    }

    let menu_id = parts.next()?.parse::<u64>().ok()?;
    let action = NavAction::parse(parts.next()?)?;
    let target_index = parts.next()?.parse::<usize>().ok()?;
    let page_count = parts.next()?.parse::<usize>().ok()?;
    let owner_id = parts.next()?.parse::<u64>().ok()?;
    let expires_at = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(NavToken {
        menu_id,
        action,
        target_index,
        page_count,
        owner_id,
        expires_at,
    })
}

/// Validate a navigation token for owner, expiry, and page bounds.
pub(crate) fn validate_nav_custom_id(
    custom_id: &str,
    actor_id: u64,
    now_unix: u64,
) -> Result<NavToken, NavValidationError> {
    let token = parse_nav_custom_id(custom_id).ok_or(NavValidationError::Invalid)?;

    if token.owner_id != actor_id {
        return Err(NavValidationError::WrongUser);
    }

    if now_unix > token.expires_at {
        return Err(NavValidationError::Expired);
    }

    if token.page_count == 0 || token.target_index >= token.page_count {
        return Err(NavValidationError::OutOfRange);
    }

    Ok(token)
}

/// Build a modal custom ID carrying the menu session state.
pub(crate) fn build_jump_custom_id(
    menu_id: u64,
    page_count: usize,
    owner_id: u64,
    expires_at: u64,
) -> String {
    format!("{JUMP_TOKEN_PREFIX}:{menu_id}:{page_count}:{owner_id}:{expires_at}")
}

/// Parse a jump-modal custom ID.
pub(crate) fn parse_jump_custom_id(custom_id: &str) -> Option<JumpToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != JUMP_TOKEN_PREFIX {
        return None;
    }

    let menu_id = parts.next()?.parse::<u64>().ok()?;
    let page_count = parts.next()?.parse::<usize>().ok()?;
    let owner_id = parts.next()?.parse::<u64>().ok()?;
    let expires_at = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(JumpToken {
        menu_id,
        page_count,
        owner_id,
        expires_at,
    })
}

/// Validate a jump-modal token for owner and expiry.
pub(crate) fn validate_jump_custom_id(
    custom_id: &str,
    actor_id: u64,
    now_unix: u64,
) -> Result<JumpToken, NavValidationError> {
    let token = parse_jump_custom_id(custom_id).ok_or(NavValidationError::Invalid)?;

    if token.owner_id != actor_id {
        return Err(NavValidationError::WrongUser);
    }

    if now_unix > token.expires_at {
        return Err(NavValidationError::Expired);
    }

    Ok(token)
}

/// Whether a custom ID addresses a navigation control.
pub(crate) fn is_nav_custom_id(custom_id: &str) -> bool {
    custom_id.starts_with(&format!("{NAV_TOKEN_PREFIX}:"))
}

/// Whether a custom ID addresses a jump modal.
pub(crate) fn is_jump_custom_id(custom_id: &str) -> bool {
    custom_id.starts_with(&format!("{JUMP_TOKEN_PREFIX}:"))
}

pub(crate) fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_token_round_trips() {
        let custom_id = build_nav_custom_id(7, NavAction::Next, 2, 5, 42, 1000);
        let token = parse_nav_custom_id(&custom_id).expect("token parses");

        assert_eq!(token.menu_id, 7);
        assert_eq!(token.action, NavAction::Next);
        assert_eq!(token.target_index, 2);
        assert_eq!(token.page_count, 5);
        assert_eq!(token.owner_id, 42);
        assert_eq!(token.expires_at, 1000);
    }

    #[test]
    fn nav_token_rejects_tampered_ids() {
        let custom_id = build_nav_custom_id(7, NavAction::Previous, 0, 5, 42, 1000);

        assert!(parse_nav_custom_id(&format!("{custom_id}:extra")).is_none());
        assert!(parse_nav_custom_id("sm:7:sideways:0:5:42:1000").is_none());
        assert!(parse_nav_custom_id("sm:7:prev:zero:5:42:1000").is_none());
        assert!(parse_nav_custom_id("other:7:prev:0:5:42:1000").is_none());
        assert!(parse_nav_custom_id("sm:7:prev:0:5:42").is_none());
    }

    #[test]
    fn nav_validation_orders_owner_before_expiry_and_range() {
        let custom_id = build_nav_custom_id(7, NavAction::Next, 9, 5, 42, 1000);

        assert_eq!(
            validate_nav_custom_id(&custom_id, 99, 0),
            Err(NavValidationError::WrongUser)
        );
        assert_eq!(
            validate_nav_custom_id(&custom_id, 42, 2000),
            Err(NavValidationError::Expired)
        );
        assert_eq!(
            validate_nav_custom_id(&custom_id, 42, 500),
            Err(NavValidationError::OutOfRange)
        );
    }

    #[test]
    fn nav_validation_accepts_in_range_owned_unexpired_tokens() {
        let custom_id = build_nav_custom_id(7, NavAction::Previous, 4, 5, 42, 1000);
        let token = validate_nav_custom_id(&custom_id, 42, 1000).expect("token validates");
        assert_eq!(token.target_index, 4);
    }

    #[test]
    fn jump_token_round_trips_and_validates() {
        let custom_id = build_jump_custom_id(3, 4, 42, 1000);
        let token = parse_jump_custom_id(&custom_id).expect("token parses");
        assert_eq!(token.page_count, 4);

        assert_eq!(
            validate_jump_custom_id(&custom_id, 41, 0),
            Err(NavValidationError::WrongUser)
        );
        assert_eq!(
            validate_jump_custom_id(&custom_id, 42, 1001),
            Err(NavValidationError::Expired)
        );
        assert!(validate_jump_custom_id(&custom_id, 42, 999).is_ok());
    }

    #[test]
    fn prefix_checks_distinguish_nav_and_jump_ids() {
        assert!(is_nav_custom_id("sm:1:next:0:2:42:0"));
        assert!(!is_nav_custom_id("smj:1:2:42:0"));
        assert!(is_jump_custom_id("smj:1:2:42:0"));
        assert!(!is_jump_custom_id("confirm:1"));
    }
}
