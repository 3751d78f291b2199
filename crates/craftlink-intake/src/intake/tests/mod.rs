mod common;

mod controller;
