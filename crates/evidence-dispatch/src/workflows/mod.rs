pub mod bulk_print;
