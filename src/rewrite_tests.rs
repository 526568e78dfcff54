// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `rewrite.rs`

#[cfg(test)]
mod tests {
    use super::super::{apply_fragment, build_configmap, render_rewrite_fragment};
    use crate::constants::HAIRPIN_PROXY_TARGET;
    use crate::extractor::extract_tls_hosts;
    use crate::labels::{K8S_MANAGED_BY, MANAGED_BY_HAIRPIN_DNS};
    use crate::test_support::{configmap, ingress};
    use k8s_openapi::api::core::v1::ConfigMap;

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|h| (*h).to_string()).collect()
    }

    #[test]
    fn test_empty_hosts_render_empty_string() {
        assert_eq!(render_rewrite_fragment(&[], HAIRPIN_PROXY_TARGET), "");
    }

    #[test]
    fn test_one_line_per_host() {
        let fragment = render_rewrite_fragment(
            &hosts(&["a.example.com", "b.example.com"]),
            HAIRPIN_PROXY_TARGET,
        );

        assert_eq!(
            fragment,
            "rewrite name a.example.com hairpin-proxy.hairpin-proxy.svc.cluster.local\n\
             rewrite name b.example.com hairpin-proxy.hairpin-proxy.svc.cluster.local\n"
        );
        assert_eq!(fragment.lines().count(), 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let ingresses = vec![
            ingress("a", "one", &[&["x.com", "y.com"]]),
            ingress("b", "two", &[]),
            ingress("c", "three", &[&["z.com"]]),
        ];

        let first = render_rewrite_fragment(&extract_tls_hosts(&ingresses), HAIRPIN_PROXY_TARGET);
        let second = render_rewrite_fragment(&extract_tls_hosts(&ingresses), HAIRPIN_PROXY_TARGET);

        assert_eq!(first, second, "Same listing must render byte-identical output");
    }

    #[test]
    fn test_custom_target() {
        let fragment = render_rewrite_fragment(&hosts(&["foo.com"]), "proxy.infra.svc.cluster.local");
        assert_eq!(fragment, "rewrite name foo.com proxy.infra.svc.cluster.local\n");
    }

    #[test]
    fn test_duplicate_hosts_render_one_line_each() {
        let fragment = render_rewrite_fragment(&hosts(&["foo.com", "bar.com", "foo.com"]), "t");

        assert_eq!(
            fragment,
            "rewrite name foo.com t\nrewrite name bar.com t\nrewrite name foo.com t\n"
        );
        assert!(fragment.ends_with('\n'));
    }

    #[test]
    fn test_apply_fragment_preserves_other_keys() {
        let mut cm = configmap("kube-system", "coredns-custom", &[("other.key", "X")]);

        let changed = apply_fragment(&mut cm, "hairpin.override", "rewrite name foo.com t\n");

        assert!(changed);
        let data = cm.data.unwrap();
        assert_eq!(data.get("other.key").map(String::as_str), Some("X"));
        assert_eq!(
            data.get("hairpin.override").map(String::as_str),
            Some("rewrite name foo.com t\n")
        );
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_apply_fragment_overwrites_stale_value() {
        let mut cm = configmap(
            "kube-system",
            "coredns-custom",
            &[("hairpin.override", "rewrite name old.com t\n")],
        );

        assert!(apply_fragment(&mut cm, "hairpin.override", "rewrite name new.com t\n"));
        assert_eq!(
            cm.data.unwrap()["hairpin.override"],
            "rewrite name new.com t\n"
        );
    }

    #[test]
    fn test_apply_fragment_reports_unchanged() {
        let mut cm = configmap(
            "kube-system",
            "coredns-custom",
            &[("hairpin.override", "rewrite name foo.com t\n")],
        );

        assert!(
            !apply_fragment(&mut cm, "hairpin.override", "rewrite name foo.com t\n"),
            "Identical value should not count as a change"
        );
    }

    #[test]
    fn test_apply_fragment_initializes_missing_data() {
        let mut cm = ConfigMap::default();

        assert!(apply_fragment(&mut cm, "hairpin.override", ""));
        assert_eq!(cm.data.unwrap()["hairpin.override"], "");
    }

    #[test]
    fn test_build_configmap_holds_only_rewrite_key() {
        let cm = build_configmap("kube-system", "coredns-custom", "hairpin.override", "frag\n");

        assert_eq!(cm.metadata.name.as_deref(), Some("coredns-custom"));
        assert_eq!(cm.metadata.namespace.as_deref(), Some("kube-system"));
        let labels = cm.metadata.labels.unwrap();
        assert_eq!(
            labels.get(K8S_MANAGED_BY).map(String::as_str),
            Some(MANAGED_BY_HAIRPIN_DNS)
        );
        let data = cm.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data["hairpin.override"], "frag\n");
    }
}
