pub mod homework_monitor;
