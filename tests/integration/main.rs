mod actions;
mod anchor;
mod helpers;
mod refresh_cycle;
