/// User and profile payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{CreateUser, UpdateUser, User};
use crate::models::user_profile::{CreateUserProfile, UpdateUserProfile, UserProfile};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        does_not_contain(pattern = "\0", message = "Name must not contain NUL characters")
    )]
    pub name: String,

    #[validate(
        email(message = "Email must be a valid address"),
        length(max = 255, message = "Email must be at most 255 characters"),
        does_not_contain(pattern = "\0", message = "Email must not contain NUL characters")
    )]
    pub email: String,
}

/// Absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        does_not_contain(pattern = "\0", message = "Name must not contain NUL characters")
    )]
    #[serde(default)]
    pub name: Option<String>,

    #[validate(
        email(message = "Email must be a valid address"),
        length(max = 255, message = "Email must be at most 255 characters"),
        does_not_contain(pattern = "\0", message = "Email must not contain NUL characters")
    )]
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// A user with their profile, if they have one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWithProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub profile: Option<UserProfileResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserProfileCreate {
    #[validate(
        length(max = 500, message = "Bio must be at most 500 characters"),
        does_not_contain(pattern = "\0", message = "Bio must not contain NUL characters")
    )]
    #[serde(default)]
    pub bio: Option<String>,

    #[validate(
        length(max = 20, message = "Phone number must be at most 20 characters"),
        does_not_contain(pattern = "\0", message = "Phone number must not contain NUL characters")
    )]
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserProfileUpdate {
    #[validate(
        length(max = 500, message = "Bio must be at most 500 characters"),
        does_not_contain(pattern = "\0", message = "Bio must not contain NUL characters")
    )]
    #[serde(default)]
    pub bio: Option<String>,

    #[validate(
        length(max = 20, message = "Phone number must be at most 20 characters"),
        does_not_contain(pattern = "\0", message = "Phone number must not contain NUL characters")
    )]
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: i32,
    pub user_id: i32,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
}

impl From<UserCreate> for CreateUser {
    fn from(payload: UserCreate) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
        }
    }
}

impl From<UserUpdate> for UpdateUser {
    fn from(payload: UserUpdate) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl UserWithProfile {
    pub fn new(user: User, profile: Option<UserProfile>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            profile: profile.map(UserProfileResponse::from),
        }
    }
}

impl From<UserProfileCreate> for CreateUserProfile {
    fn from(payload: UserProfileCreate) -> Self {
        Self {
            bio: payload.bio,
            phone_number: payload.phone_number,
        }
    }
}

impl From<UserProfileUpdate> for UpdateUserProfile {
    fn from(payload: UserProfileUpdate) -> Self {
        Self {
            bio: payload.bio,
            phone_number: payload.phone_number,
        }
    }
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            bio: profile.bio,
            phone_number: profile.phone_number,
        }
    }
}
