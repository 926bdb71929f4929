mod common;
mod specifications;
mod upgradable;
