// Engine modules: fixed-timestep stepper and input consumption

pub mod game_loop;
pub mod input;
