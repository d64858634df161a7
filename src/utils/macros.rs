// Log the error at `error` level and return it
macro_rules! return_error {
    ($err:expr) => {{
        let err = $err;
        tracing::error!(target: "tensor", error = %err, "check failed");
        return Err(err);
    }};
}

macro_rules! check_or_return_error {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return_error!($err);
        }
    };
}
