pub mod consult;
