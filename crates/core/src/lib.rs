pub mod pipeline;
pub mod process;
pub mod shared;

pub mod source {
    pub mod domain {
        pub mod pipe_factory;
        pub mod source;
        pub mod source_error;
    }
    pub mod infrastructure;
}
