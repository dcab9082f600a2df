mod session_id;
mod session_record;

pub use session_id::SessionId;
pub use session_record::SessionRecord;
