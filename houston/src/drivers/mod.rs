pub mod system_timer;
