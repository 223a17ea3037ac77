pub(crate) mod qr_session;
