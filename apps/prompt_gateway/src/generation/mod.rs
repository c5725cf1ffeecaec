pub mod extraction;
pub mod gemini_service;
pub mod generation_controller;
pub mod generation_service;
pub mod in_process;
pub mod instruction;
pub mod upstream;
