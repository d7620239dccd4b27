//! Storage module for preview images
//!
//! Provides a MinIO/S3-compatible client for public image uploads.

mod minio_client;

pub use minio_client::MinIOClient;
