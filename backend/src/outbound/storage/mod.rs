//! Filesystem storage for try-on uploads and result artifacts.

mod fs_tryon_store;

pub use fs_tryon_store::{
    FsTryOnStore, MANIFEST_FILE, RESULT_FILE, RESULT_IMAGE_FILE, StorageInitError,
};
