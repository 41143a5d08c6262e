//! File-based registry synchronization.
//!
//! A sync runs in two phases: [`FileBasedRegistrySync::scan_and_sync`] loads
//! the configuration directory, then [`OrphanReconciler::reconcile`] removes
//! shared providers whose file disappeared, using the shared names the scan
//! just collected.

pub mod file_based;
pub mod reconcile;

pub use file_based::{FileBasedIndex, FileBasedRegistrySync, ScanReport};
pub use reconcile::{OrphanReconciler, ReconcileReport};
