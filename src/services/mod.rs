pub mod givewp;
