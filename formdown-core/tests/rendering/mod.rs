mod controls;
mod escaping;
mod extensions;
mod scenarios;
