mod common;
mod outbreak;
mod routing;
