//! Storage layer for notes

mod note_store;

pub use note_store::NoteStore;
