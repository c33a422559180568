mod alert;
mod location;
mod violation;
mod zone;

pub use alert::{Alert, AlertIssuer};
pub use location::{LocationSample, LocationStatus};
pub use violation::{GeofenceViolation, Severity, ViolationType};
pub use zone::{SafetyLevel, Zone};
