// ABOUTME: Validated domain values for image promotion.
// ABOUTME: Remote and local image references plus the trigger payload.

mod image_ref;
mod local_image;
mod request;
mod workload_name;

pub use image_ref::{ImageRef, ParseImageRefError};
pub use local_image::{DEFAULT_TAG, LocalImageRef};
pub use request::DeploymentRequest;
pub use workload_name::{WorkloadName, WorkloadNameError};
