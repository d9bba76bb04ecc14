mod collision;
mod vector;
