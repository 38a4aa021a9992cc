pub mod course;
pub mod demo_booking;
pub mod event;
pub mod event_registration;
pub mod image;
pub mod inquiry;
pub mod statistics;
pub mod status;
pub mod user;
pub mod validation;

pub use course::{Course, CourseStatistics, NewCourseRequest, ProgramCount, UpdateCourseRequest};
pub use demo_booking::{DemoBooking, DemoBookingFilter, DemoBookingStatistics, NewDemoBookingRequest};
pub use event::{Event, EventStatistics, NewEvent, NewEventRequest, UpdateEventRequest};
pub use event_registration::{
    EventRegistration, EventRegistrationCount, EventRegistrationFilter,
    EventRegistrationStatistics, NewEventRegistrationRequest,
};
pub use image::{Image, StoredImage, UploadedFile};
pub use inquiry::{
    CourseInquiryCount, Inquiry, InquiryFilter, InquiryStatistics, NewInquiry, NewInquiryRequest,
};
pub use statistics::{DailyCount, StatusCount};
pub use status::{LeadStatus, RegistrationStatus, StatusSet, UpdateStatusRequest};
pub use user::{LoginRequest, SessionUser, User, UserRole};
