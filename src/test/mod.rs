mod engine;
mod simulator;
