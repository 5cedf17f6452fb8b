//! Modul pra-impor untuk memudahkan pemakaian

pub use super::activity_logs::{
    ActiveModel as ActivityLogActiveModel, Entity as ActivityLogs, Model as ActivityLogModel,
};
pub use super::signature_records::{
    ActiveModel as SignatureRecordActiveModel, Entity as SignatureRecords,
    Model as SignatureRecordModel,
};
pub use super::spj_forms::{
    ActiveModel as SpjFormActiveModel, Entity as SpjForms, Model as SpjFormModel,
};
pub use super::spj_submissions::{
    ActiveModel as SpjSubmissionActiveModel, Entity as SpjSubmissions, Model as SpjSubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
pub use super::verification_sheets::{
    ActiveModel as VerificationSheetActiveModel, Entity as VerificationSheets,
    Model as VerificationSheetModel,
};
