//! Reusable UI components for the complaint TUI

pub mod complaint_list;
pub mod form_field;
pub mod status_display;

pub use complaint_list::ComplaintList;
pub use form_field::{Form, FormField, FormFieldType};
pub use status_display::{StatusDisplay, StatusMessage, StatusType};
