//! Where the user is sent when the session cannot be recovered

/// Redirect hook invoked once the credential store has been wiped after a
/// failed refresh. The gateway always passes `admin_auth::LOGIN_ROUTE`.
pub trait Navigator: Send + Sync {
    fn redirect(&self, location: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn redirect(&self, location: &str) {
        self(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn closures_are_navigators() {
        let visited = Mutex::new(Vec::new());
        let navigator = |location: &str| visited.lock().unwrap().push(location.to_owned());
        navigator.redirect("/login");
        assert_eq!(*visited.lock().unwrap(), vec!["/login".to_owned()]);
    }
}
