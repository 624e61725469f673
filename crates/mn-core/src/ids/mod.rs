mod subject_id;

pub use subject_id::SubjectId;
