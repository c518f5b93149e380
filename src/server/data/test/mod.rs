mod auth;
mod cart;
mod company;
mod inspection;
mod media;
mod notification;
mod ownership;
mod property;
mod review;
mod transaction;
mod user;
