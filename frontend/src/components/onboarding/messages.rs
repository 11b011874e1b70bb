use crm_common::model::file::{FileHandle, FileSlot};
use crm_common::onboarding::Action;

pub enum Msg {
    /// Forwarded to the onboarding session as-is.
    Apply(Action),
    PickSlotFile(FileSlot, web_sys::File),
    SelectDocumentType(String),
    SetCustomDocumentName(String),
    PickDocumentFile(web_sys::File),
    DocumentFileRead(FileHandle),
    AddDocument,
    ReadFailed(String),
}
