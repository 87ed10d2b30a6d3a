mod chart;
mod repair;
