pub mod decompression;
pub mod installer;
pub mod mod_fs;
pub mod mod_manager;
pub mod packager;
pub mod repository;
pub mod scanner;
