pub mod c_source;
