mod check_test;
mod config_test;
mod services_test;
