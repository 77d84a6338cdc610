pub mod bookmarks;
pub mod login_state;
