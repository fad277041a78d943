use rocket::{
    http::Status,
    outcome::try_outcome,
    request::{FromRequest, Outcome},
    Request,
};

use super::{Arcade, Mount};
use crate::games::RouteGroup;
use crate::score::ScoreKeeper;

/// The route group that owns the route being served, found by the route's mount point.
pub struct MountedGroup<'r>(&'r Mount);

impl<'r> MountedGroup<'r> {
    pub fn mount(&self) -> &'r Mount {
        self.0
    }

    pub fn group(&self) -> &'static RouteGroup {
        self.0.group()
    }
}

/// The score keeper of the route group being served.
pub struct GroupScore<'r>(&'r ScoreKeeper);

impl<'r> GroupScore<'r> {
    pub fn keeper(&self) -> &'r ScoreKeeper {
        self.0
    }
}

#[derive(Debug)]
pub enum GroupError {
    Unmanaged,
    Unrouted,
    Unmounted { base: String },
    NotScoring { group: &'static str },
}

impl std::fmt::Display for GroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unmanaged => write!(f, "no arcade is managed by this instance"),
            Self::Unrouted => write!(f, "the request has not been routed"),
            Self::Unmounted { base } => write!(f, "no route group is mounted at {}", base),
            Self::NotScoring { group } => write!(f, "{} does not keep a high score", group),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for MountedGroup<'r> {
    type Error = GroupError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let arcade = match request.rocket().state::<Arcade>() {
            Some(arcade) => arcade,
            None => return Outcome::Error((Status::InternalServerError, GroupError::Unmanaged)),
        };

        let base = match request.route() {
            Some(route) => route.uri.base().to_string(),
            None => return Outcome::Error((Status::InternalServerError, GroupError::Unrouted)),
        };

        match arcade.find(&base) {
            Some(mount) => Outcome::Success(MountedGroup(mount)),
            None => Outcome::Error((Status::NotFound, GroupError::Unmounted { base })),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for GroupScore<'r> {
    type Error = GroupError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let group = try_outcome!(request.guard::<MountedGroup<'r>>().await);
        match group.mount().keeper() {
            Some(keeper) => Outcome::Success(GroupScore(keeper)),
            None => Outcome::Error((
                Status::NotFound,
                GroupError::NotScoring {
                    group: group.group().name,
                },
            )),
        }
    }
}
