#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod goal;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_input, assert_form_submit_button, assert_hx_endpoint, must_get_form,
};
pub(crate) use goal::{assert_alert, broken_goal_state, broken_store_message, get_goal_state};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::assert_content_type;
