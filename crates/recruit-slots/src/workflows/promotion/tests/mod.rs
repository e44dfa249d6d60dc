mod common;
mod promoter;
