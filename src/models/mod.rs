pub mod meeting;

pub use meeting::{Attendee, CreateMeetingParams, JoinParams, MeetingInfo, MeetingResult, Role};
