//! Definisi entitas SeaORM
//!
//! Entitas ini dipakai lapisan storage untuk operasi basis data, terpisah
//! dari entitas bisnis di modul models. Storage melakukan CRUD dengan
//! entitas ini lalu mengonversinya ke entitas bisnis.

pub mod prelude;

pub mod activity_logs;
pub mod signature_records;
pub mod spj_forms;
pub mod spj_submissions;
pub mod users;
pub mod verification_sheets;
