//! Traits (ports) defined by the domain layer

mod repositories;

pub use repositories::{
    ApplicationRepository, CredentialRepository, FacilityRepository, NurseProfileRepository,
    PaymentRepository, RepoResult, ShiftQuery, ShiftRepository, TimeRecordRepository,
    UserRepository,
};
