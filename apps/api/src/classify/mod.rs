// Classification pipeline as seen by the HTTP host: validate input, normalize,
// predict. Handlers stay thin; everything testable lives in `service`.

pub mod handlers;
pub mod pdf;
pub mod service;
