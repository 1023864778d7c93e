pub mod voicing;
