//! Business logic services for the C&R Logistics inventory backend

pub mod client;
pub mod export;
pub mod note;
pub mod product;
pub mod supplier;

pub use client::ClientService;
pub use export::ExportService;
pub use note::NoteService;
pub use product::ProductService;
pub use supplier::SupplierService;
