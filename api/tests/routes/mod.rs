mod admin_test;
mod auth_test;
mod lecturers_test;
mod results_test;
mod submissions_test;
