pub mod arrays;
