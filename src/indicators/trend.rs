pub mod ma;
