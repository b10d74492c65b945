pub mod parent_command;
