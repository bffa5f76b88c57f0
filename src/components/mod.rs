//! UI Components
//!
//! One component per page, plus the pieces they share.

mod app_header;
mod comment_item;
mod delete_confirm_dialog;
mod diagnostics_panel;
mod file_input;
mod login_form;
mod post_card;
mod post_detail;
mod post_form;
mod post_list;
mod profile_form;

pub use app_header::AppHeader;
pub use comment_item::CommentItem;
pub use delete_confirm_dialog::DeleteConfirmDialog;
pub use diagnostics_panel::DiagnosticsPanel;
pub use login_form::LoginForm;
pub use post_card::PostCard;
pub use post_detail::PostDetailView;
pub use post_form::NewPostForm;
pub use post_list::PostList;
pub use profile_form::ProfileForm;
