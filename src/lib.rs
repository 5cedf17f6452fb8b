//! SuPerJe - layanan backend pengelolaan SPJ (Surat Pertanggungjawaban)
//!
//! Backend alur kerja dokumen pertanggungjawaban belanja berbasis Actix Web.
//!
//! # Arsitektur
//! - `config`: manajemen konfigurasi
//! - `entity`: entitas basis data SeaORM
//! - `errors`: penanganan error terpadu
//! - `middlewares`: middleware autentikasi dan otorisasi
//! - `models`: definisi model data
//! - `routes`: lapisan rute API
//! - `runtime`: pengelolaan siklus hidup server
//! - `services`: lapisan logika bisnis
//! - `storage`: lapisan penyimpanan data (SeaORM)
//! - `utils`: fungsi pembantu

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
