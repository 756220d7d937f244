pub mod m202510190001_create_lecturers;
pub mod m202510190002_create_submissions;
pub mod m202510190003_create_results;
