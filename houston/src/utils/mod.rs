pub mod boot_logger;
